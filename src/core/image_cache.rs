// SPDX-License-Identifier: GPL-3.0-only

use std::collections::{HashMap, HashSet};

use cosmic::widget::image;
use futures_util::{Stream, StreamExt};

/// How many sprites are downloaded at the same time
const MAX_CONCURRENT_DOWNLOADS: usize = 16;

/// Sprite handles keyed by their image URL, kept for the whole session
#[derive(Debug, Default)]
pub struct SpriteCache {
    handles: HashMap<String, image::Handle>,
    requested: HashSet<String>,
}

impl SpriteCache {
    pub fn get(&self, url: &str) -> Option<&image::Handle> {
        self.handles.get(url)
    }

    pub fn insert(&mut self, url: String, handle: image::Handle) {
        self.handles.insert(url, handle);
    }

    /// Returns the URLs that were never requested and marks them as requested
    pub fn claim_missing<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        urls.into_iter()
            .filter(|url| !url.is_empty())
            .filter_map(|url| {
                self.requested
                    .insert(url.to_string())
                    .then(|| url.to_string())
            })
            .collect()
    }
}

/// Downloads every url, yielding each sprite as soon as it arrives
pub fn load_sprites(
    client: reqwest::Client,
    urls: Vec<String>,
) -> impl Stream<Item = (String, Option<image::Handle>)> + Send + 'static {
    futures_util::stream::iter(urls)
        .map(move |url| {
            let client = client.clone();
            async move {
                match download_image(&client, &url).await {
                    Ok(bytes) => {
                        let handle = image::Handle::from_bytes(bytes);
                        (url, Some(handle))
                    }
                    Err(err) => {
                        tracing::warn!(%url, error = %err, "failed to download sprite");
                        (url, None)
                    }
                }
            }
        })
        .buffer_unordered(MAX_CONCURRENT_DOWNLOADS)
}

async fn download_image(client: &reqwest::Client, image_url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(image_url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
