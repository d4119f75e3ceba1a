//! Static placement catalog.
//!
//! Every supported ad placement with its aspect ratios, recommended
//! resolution, and UI-overlay safe zone. Defined once, never mutated.

use crate::types::FormatGroup;

/// Identity of a placement. The numeric value is the id the model uses in
/// `placementSummaries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementId {
    FbFeed = 0,
    FbVideoFeed = 1,
    FbStories = 2,
    FbMarketplace = 3,
    FbReels = 4,
    IgFeed = 5,
    IgStories = 6,
    IgReels = 7,
    IgExplore = 8,
    MessengerInbox = 9,
    MessengerStories = 10,
    AudienceNetwork = 11,
}

impl PlacementId {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        use PlacementId::*;
        Some(match index {
            0 => FbFeed,
            1 => FbVideoFeed,
            2 => FbStories,
            3 => FbMarketplace,
            4 => FbReels,
            5 => IgFeed,
            6 => IgStories,
            7 => IgReels,
            8 => IgExplore,
            9 => MessengerInbox,
            10 => MessengerStories,
            11 => AudienceNetwork,
            _ => return None,
        })
    }
}

/// Kind of platform UI overlaying the creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiType {
    Feed,
    Stories,
    Reels,
    Marketplace,
    MessengerInbox,
}

/// Border regions (percent of canvas) where platform chrome is expected to
/// overlap the creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeZone {
    pub top: u8,
    pub bottom: u8,
    pub left: Option<u8>,
    pub right: Option<u8>,
}

/// One entry of the placement catalog.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub id: PlacementId,
    pub platform: &'static str,
    pub name: &'static str,
    pub ui_type: UiType,
    pub group: FormatGroup,
    pub aspect_ratios: &'static [&'static str],
    pub recommended_resolution: &'static str,
    pub safe_zone: SafeZone,
}

const fn edges(top: u8, bottom: u8) -> SafeZone {
    SafeZone { top, bottom, left: None, right: None }
}

const fn all_edges(top: u8, bottom: u8, left: u8, right: u8) -> SafeZone {
    SafeZone { top, bottom, left: Some(left), right: Some(right) }
}

/// The full catalog, ordered by platform.
pub const PLACEMENTS: [Placement; 12] = [
    Placement {
        id: PlacementId::FbFeed,
        platform: "Facebook",
        name: "Feed",
        ui_type: UiType::Feed,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["1:1", "4:5"],
        recommended_resolution: "1080x1080 / 1350 px",
        safe_zone: edges(10, 10),
    },
    Placement {
        id: PlacementId::FbVideoFeed,
        platform: "Facebook",
        name: "Video Feed",
        ui_type: UiType::Feed,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["4:5", "1:1"],
        recommended_resolution: "1080x1350 px",
        safe_zone: edges(10, 10),
    },
    Placement {
        id: PlacementId::FbStories,
        platform: "Facebook",
        name: "Stories",
        ui_type: UiType::Stories,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(14, 20),
    },
    Placement {
        id: PlacementId::FbReels,
        platform: "Facebook",
        name: "Reels",
        ui_type: UiType::Reels,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(14, 20),
    },
    Placement {
        id: PlacementId::FbMarketplace,
        platform: "Facebook",
        name: "Marketplace",
        ui_type: UiType::Marketplace,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["1:1"],
        recommended_resolution: "1080x1080 px",
        safe_zone: all_edges(10, 10, 10, 10),
    },
    Placement {
        id: PlacementId::IgFeed,
        platform: "Instagram",
        name: "Feed",
        ui_type: UiType::Feed,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["1:1", "4:5"],
        recommended_resolution: "1080x1080 / 1350 px",
        safe_zone: edges(10, 10),
    },
    Placement {
        id: PlacementId::IgStories,
        platform: "Instagram",
        name: "Stories",
        ui_type: UiType::Stories,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(14, 20),
    },
    Placement {
        id: PlacementId::IgReels,
        platform: "Instagram",
        name: "Reels",
        ui_type: UiType::Reels,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(14, 20),
    },
    Placement {
        id: PlacementId::IgExplore,
        platform: "Instagram",
        name: "Explore",
        ui_type: UiType::Feed,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["1:1"],
        recommended_resolution: "1080x1080 px",
        safe_zone: all_edges(10, 15, 10, 15),
    },
    Placement {
        id: PlacementId::MessengerInbox,
        platform: "Messenger",
        name: "Inbox",
        ui_type: UiType::MessengerInbox,
        group: FormatGroup::SquareLike,
        aspect_ratios: &["1.91:1"],
        recommended_resolution: "1200x628 px",
        safe_zone: all_edges(10, 10, 10, 10),
    },
    Placement {
        id: PlacementId::MessengerStories,
        platform: "Messenger",
        name: "Stories",
        ui_type: UiType::Stories,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(14, 20),
    },
    Placement {
        id: PlacementId::AudienceNetwork,
        platform: "Audience Network",
        name: "Native/Interstitial",
        ui_type: UiType::Stories,
        group: FormatGroup::Vertical,
        aspect_ratios: &["9:16", "1:1", "1.91:1"],
        recommended_resolution: "1080x1920 px",
        safe_zone: edges(15, 20),
    },
];

/// Placements belonging to one format group, in catalog order.
pub fn for_group(group: FormatGroup) -> Vec<&'static Placement> {
    PLACEMENTS.iter().filter(|p| p.group == group).collect()
}

/// Resolve a placement by its numeric id.
pub fn by_id(id: PlacementId) -> &'static Placement {
    PLACEMENTS
        .iter()
        .find(|p| p.id == id)
        .expect("catalog covers every placement id")
}

/// Resolve a placement from the numeric id string the model answers with.
pub fn by_id_str(id: &str) -> Option<&'static Placement> {
    let index: usize = id.trim().parse().ok()?;
    let id = PlacementId::from_index(index)?;
    Some(by_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_splits_evenly_into_groups() {
        assert_eq!(for_group(FormatGroup::SquareLike).len(), 6);
        assert_eq!(for_group(FormatGroup::Vertical).len(), 6);
    }

    #[test]
    fn ids_are_unique_and_resolvable() {
        for (i, placement) in PLACEMENTS.iter().enumerate() {
            let resolved = by_id_str(&placement.id.index().to_string()).unwrap();
            assert_eq!(resolved.id, placement.id);
            // Every other entry must carry a different id.
            for other in PLACEMENTS.iter().skip(i + 1) {
                assert_ne!(placement.id, other.id);
            }
        }
    }

    #[test]
    fn id_string_lookup_rejects_garbage() {
        assert!(by_id_str("12").is_none());
        assert!(by_id_str("feed").is_none());
        assert!(by_id_str("-1").is_none());
    }

    #[test]
    fn stories_reserve_the_bottom_fifth() {
        for placement in PLACEMENTS.iter().filter(|p| p.ui_type == UiType::Stories) {
            assert!(placement.safe_zone.bottom >= 20);
        }
    }
}
