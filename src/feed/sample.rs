//! Bundled posts served whenever the live feed is unavailable.

use crate::core::config::INSTAGRAM_PROFILE_URL;
use crate::core::models::RawPost;

const CDN_BASE: &str =
    "https://cdn.jsdelivr.net/gh/ImpashreeShetty/responsible-individuals-website@main/Launchphotos";

pub struct SamplePost {
    pub id: &'static str,
    pub caption: &'static str,
    pub image: &'static str,
    pub timestamp: &'static str,
}

pub static SAMPLE_POSTS: [SamplePost; 3] = [
    SamplePost {
        id: "sample-1",
        caption: "Learning circle as part of our Responsible Individuals launch week.",
        image: "IMG_2760.jpeg",
        timestamp: "2025-07-19T10:00:00+05:30",
    },
    SamplePost {
        id: "sample-2",
        caption: "WASH demo with volunteers and teachers at GHPS Bachenahatti.",
        image: "IMG_2758.jpeg",
        timestamp: "2025-08-05T09:00:00+05:30",
    },
    SamplePost {
        id: "sample-3",
        caption: "STEM lab restock underway thanks to our community donors.",
        image: "IMG_2764.jpeg",
        timestamp: "2025-08-22T14:30:00+05:30",
    },
];

impl SamplePost {
    #[must_use]
    pub fn to_raw(&self) -> RawPost {
        RawPost {
            id: Some(self.id.to_string()),
            caption: Some(self.caption.to_string()),
            media_url: Some(format!("{CDN_BASE}/{}", self.image)),
            thumbnail_url: None,
            permalink: Some(INSTAGRAM_PROFILE_URL.to_string()),
            timestamp: Some(self.timestamp.to_string()),
            media_type: Some("IMAGE".to_string()),
        }
    }
}

/// The sample set in upstream shape, ready for normalization.
#[must_use]
pub fn sample_raw_posts() -> Vec<RawPost> {
    SAMPLE_POSTS.iter().map(SamplePost::to_raw).collect()
}
