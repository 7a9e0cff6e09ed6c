//! GPU textures for the pages currently on screen.

use std::collections::{HashMap, HashSet};

use crate::prelude::*;

/// Textures keyed by page handle. Pages that are not prepared yet are queued
/// for preparation once and drawn blank until they are.
#[derive(Default)]
pub struct PageTextures {
    textures: HashMap<PageHandle, TextureHandle>,
    requested: HashSet<PageHandle>,
    undecodable: HashSet<PageHandle>,
}

impl PageTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `handle`, uploading it from the cache if it was prepared
    /// since the last frame.
    pub fn get(&mut self, ctx: &Context, cache: &AssetCache, handle: &PageHandle) -> Option<TextureHandle> {
        if let Some(texture) = self.textures.get(handle) {
            return Some(texture.clone());
        }
        if self.undecodable.contains(handle) {
            return None;
        }

        match cache.resolve(handle) {
            Renderable::Prepared(asset) => {
                let texture = upload(ctx, &asset);
                match &texture {
                    Some(texture) => {
                        self.textures.insert(handle.clone(), texture.clone());
                    }
                    None => {
                        debug!("Page {} cannot be decoded; drawing it blank", handle);
                        self.undecodable.insert(handle.clone());
                    }
                }
                texture
            }
            Renderable::Unprepared(handle) => {
                if self.requested.insert(handle.clone()) {
                    // the gate is not needed; the next frames pick the page up
                    let _ = cache.prefetch(vec![handle]);
                }
                None
            }
        }
    }

    /// Release textures for pages no longer on screen.
    pub fn retain_visible(&mut self, visible: &[PageHandle]) {
        self.textures.retain(|handle, _| visible.contains(handle));
        self.requested.retain(|handle| visible.contains(handle));
    }
}

fn upload(ctx: &Context, asset: &PreparedAsset) -> Option<TextureHandle> {
    let decoded;
    let image = match &asset.image {
        Some(image) => image,
        None => {
            decoded = image::load_from_memory(&asset.bytes).ok()?;
            &decoded
        }
    };
    let (w, h) = image.dimensions();
    let rgba = image.to_rgba8();
    let color_image = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_flat_samples().as_slice());
    Some(ctx.load_texture(asset.handle.as_str(), color_image, TextureOptions::LINEAR))
}
