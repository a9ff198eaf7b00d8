use crate::layout::LayoutResult;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub placed: Vec<PlacedDump>,
    pub dropped: Vec<DroppedDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedDump {
    pub text: String,
    pub weight: f32,
    pub magnitude: f32,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct DroppedDump {
    pub text: String,
    pub weight: f32,
    pub magnitude: f32,
}

impl LayoutDump {
    pub fn from_result(result: &LayoutResult) -> Self {
        let placed = result
            .placed
            .iter()
            .map(|label| PlacedDump {
                text: label.text.clone(),
                weight: label.weight,
                magnitude: label.magnitude,
                font_size: label.font_size,
                x: label.x,
                y: label.y,
                width: label.width,
                height: label.height,
                color: label.color.to_string(),
            })
            .collect();

        let dropped = result
            .dropped
            .iter()
            .map(|label| DroppedDump {
                text: label.text.clone(),
                weight: label.weight,
                magnitude: label.magnitude,
            })
            .collect();

        LayoutDump {
            width: result.bounds.width,
            height: result.bounds.height,
            placed,
            dropped,
        }
    }
}

pub fn write_layout_dump(path: Option<&Path>, result: &LayoutResult) -> anyhow::Result<()> {
    let dump = LayoutDump::from_result(result);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}
