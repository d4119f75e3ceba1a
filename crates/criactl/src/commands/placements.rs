//! Print the placement catalog.

use anyhow::Result;
use serde_json::json;

use cria::catalog::{self, Placement};
use cria::FormatGroup;

use crate::display;
use crate::errors::EXIT_SUCCESS;

pub fn run(group: Option<FormatGroup>, json: bool) -> Result<i32> {
    let placements: Vec<&Placement> = match group {
        Some(group) => catalog::for_group(group),
        None => catalog::PLACEMENTS.iter().collect(),
    };

    if json {
        let entries: Vec<_> = placements
            .iter()
            .map(|p| {
                json!({
                    "id": p.id.index(),
                    "platform": p.platform,
                    "name": p.name,
                    "group": p.group,
                    "aspectRatios": p.aspect_ratios,
                    "recommendedResolution": p.recommended_resolution,
                    "safeZone": {
                        "top": p.safe_zone.top,
                        "bottom": p.safe_zone.bottom,
                        "left": p.safe_zone.left,
                        "right": p.safe_zone.right,
                    },
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", display::format_placements(&placements));
    }
    Ok(EXIT_SUCCESS)
}
