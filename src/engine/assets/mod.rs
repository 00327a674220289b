// Asset references
//
// The engine owns and loads assets; this crate only carries typed handles.

mod handle;

pub use handle::{AssetHandle, AssetId, IconHandle, TextureAsset};
