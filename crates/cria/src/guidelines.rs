//! Fixed reference document embedded in every analysis prompt.
//!
//! Covers eligibility rules for the platform's automatic enhancements and a
//! per-placement safe-zone summary the model must check creatives against.

/// Requirements and composition guidance for Meta Advantage+ automatic
/// enhancements, plus the safe-zone table. Appended verbatim to the prompt.
pub const ENHANCEMENT_GUIDELINES: &str = r#"
--- CREATIVE REQUIREMENTS FOR META ADVANTAGE+ AUTOMATIC ENHANCEMENTS ---

Automatic image animation (3D Motion)
- Description: turns a static image into a short clip with motion (zoom, pan). Still images only.
- Requirements: a single JPG/PNG image, not a GIF or video. Clearly defined subject and discernible background. High resolution.
- Free space: leave margins around the main subject so the zoom does not crop it. Keep logos and text away from the edges.
- Composition: centered subject, uniform or expandable background (sky, landscape).
- When to deactivate: minimalist styles, images that already carry the message, or images with lots of small text that motion would make unreadable.
- Format: prepare the creative with a vertical 9:16 video in mind even when starting from a square. Center the content and leave top/bottom margins.

Text overlay (text templates)
- Description: places ad copy over the image using the platform's templates.
- Requirements: ad copy (headline, description) must be provided. Single images only.
- Free space: reserve uncluttered areas (usually top or bottom) for the text. Leave roughly 20% of the canvas at one edge with a uniform background (sky, wall) to keep the overlay legible.
- Composition: simple and centered. Avoid busy backgrounds.
- When to deactivate: branded typography in the design, or when the overlay would be redundant.
- Format: used mainly in feeds (1:1, 4:5) and Reels.

Enhanced CTA in Stories
- Description: highlights the call to action in Stories with extra promotional text or a more prominent design.
- Requirements: Stories-type placements (9:16) only. A configured CTA and promotional phrases in the ad text.
- Free space: reserve the bottom 15-20% of 9:16 creatives. The sticker/button appears there; keep logos and key text out of that band.
- Composition: main subject center-top, leaving air below for the CTA.
- When to deactivate: when full control over the message is required or the story's aesthetic is delicate.
- Format: 9:16 Stories/Reels only. Does not apply to 1:1 or 4:5 feed.

Visual touch-ups (brightness, contrast, automatic reframing)
- Description: automatic brightness, contrast, and crop adjustments.
- Requirements: good source resolution. Available for photos and videos.
- Free space: keep a safety margin around important content; reframing may trim the edges.
- Composition: centered, distinguishable subject, neutral background.
- When to deactivate: professionally edited images or a deliberate artistic style (e.g. vintage filters).
- Format: adapts one creative across formats; works best for moderate differences. For large jumps (1:1 to 9:16) prefer generative image expansion.

Generative image expansion
- Description: extends a static image's background with generative AI to fit new sizes.
- Requirements: static images only. High-quality base image without extreme crops or graphic frames. Works best with natural photos.
- Free space: the subject should be complete and centered, with expandable backgrounds (sky, walls).
- Composition: central focus and homogeneous background at the borders. Avoid duplicated subjects or geometric patterns at the edges.
- When to deactivate: when aesthetic quality suffers, the expansion produces artifacts, or per-format creatives already exist.
- Format: ideal for adapting a creative to very different formats (1:1 to 9:16). Keep the subject central in the original.

Background music
- Description: turns a static ad (image or carousel) into a video with background music.
- Requirements: single image or carousel. Not applied to videos that already carry audio.
- Free space: avoid detail in the upper corners, where the audio icon may appear.
- Composition: the image should carry an emotion the music can reinforce; implied motion works well.
- When to deactivate: sound-off audiences, music that clashes with the brand, or ads that demand visual concentration (heavy text).
- Format: lets a static ad enter video placements (Reels, Stories). The ad must work without audio; feeds are muted by default.

Catalog item insertion
- Description: shows products from the catalog alongside the main ad.
- Requirements: an active product catalog with high-quality images (white or transparent background).
- Free space: products appear next to the ad (usually below), not on top of it, shrinking the main creative's share of the screen.
- Composition: the main creative should be inspirational (lifestyle) and complement the product cards, not compete with them.
- When to deactivate: awareness objectives, or a poorly curated catalog.
- Format: mainly mobile feed. Not applied in Stories or Reels. Prefer 4:5 so the creative coexists with the product carousel.

Dynamic price/offer labels
- Description: overlays catalog data (price, discount) on the product image.
- Requirements: dynamic catalog ads with a well-configured product feed. Images need a neutral background and enough room.
- Free space: leave areas (corners, top) where the label can sit without covering the product.
- Composition: simple and centered. Detailed backgrounds hurt label legibility.
- When to deactivate: when it hurts the aesthetic (luxury brands), the promotion is complex ("buy 2 get 1"), or the price feed drifts out of sync.
- Format: mainly feed and Audience Network. Not Stories/Reels. Works best with 1:1 or slightly vertical 4:5 images.

--- SAFE-ZONE SUMMARY PER PLACEMENT ---
Placement	Aspect	Resolution	Top safe zone	Bottom safe zone	Key notes
IG/Facebook Stories	9:16	1080x1920 px	14%	20%	No text/logos at the extremes. Central safe area: 1080x1310 px.
Reels	9:16	1080x1920 px	14%	20%	Same as Stories plus extra icons. Keep focus in the central 50%.
IG/Facebook Feed	1:1 / 4:5	1080x1080 / 1350 px	10%	10%	Automatic text overlay. For 4:5, center the key content in the 1:1 area.
Marketplace	1:1	1080x1080 px	10% (all edges)	10% (all edges)	Clean, centered visual.
Messenger Inbox	1.91:1	1200x628 px	10% (~60px)	10% (~60px)	Simple image, few details.
Video Feed / Watch	4:5 / 1:1	1080x1350 px	10%	10%	Same as feed. Avoid captions near the bottom.
Audience Network	varies (9:16 / 1.91:1)	1200x628 / 1080x1920	15-20% (9:16)	15-20% (9:16)	Side margins for native slots. Close buttons may cover corners.
IG Explore	1:1	1080x1080 px	10-15%	10-15%	Thumbnails; avoid visual overload.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guidelines_cover_all_eight_enhancements() {
        for heading in [
            "3D Motion",
            "Text overlay",
            "Enhanced CTA",
            "Visual touch-ups",
            "Generative image expansion",
            "Background music",
            "Catalog item insertion",
            "Dynamic price/offer labels",
        ] {
            assert!(
                ENHANCEMENT_GUIDELINES.contains(heading),
                "missing section: {heading}"
            );
        }
    }

    #[test]
    fn guidelines_include_safe_zone_table() {
        assert!(ENHANCEMENT_GUIDELINES.contains("SAFE-ZONE SUMMARY"));
        assert!(ENHANCEMENT_GUIDELINES.contains("1080x1920"));
    }
}
