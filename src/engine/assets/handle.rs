// Type-safe asset handles
//
// Icons and other presentation assets are opaque to the movement and ability
// code: it only stores and compares handles, the engine resolves them.

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create an asset ID from a string path
    ///
    /// FNV-1a, so the same path maps to the same ID across runs and builds.
    pub fn from_path(path: &str) -> Self {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let hash = path
            .bytes()
            .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME));
        Self(hash)
    }

    /// Create an asset ID from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Type-safe handle to an engine-owned asset
///
/// The `T` parameter ensures handles can only be used with the correct asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<T>,
}

impl<T> AssetHandle<T> {
    /// Wrap an existing asset ID
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Create a handle for the asset at `path`
    pub fn from_path(path: &str) -> Self {
        Self::new(AssetId::from_path(path))
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker types for different asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureAsset;

/// Icon shown next to an ability or improvement in the UI
pub type IconHandle = AssetHandle<TextureAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("icons/dash.png");
        let id2 = AssetId::from_path("icons/dash.png");
        let id3 = AssetId::from_path("icons/fireball.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_asset_id_is_stable() {
        // FNV-1a of the empty string is the offset basis
        assert_eq!(AssetId::from_path("").as_u64(), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn test_asset_id_roundtrip() {
        let id = AssetId::from_u64(12345);
        assert_eq!(id.as_u64(), 12345);
    }

    #[test]
    fn test_icon_handle_equality() {
        let a = IconHandle::from_path("icons/dash.png");
        let b = IconHandle::new(AssetId::from_path("icons/dash.png"));
        assert_eq!(a, b);
        assert_ne!(a, IconHandle::from_path("icons/slam.png"));
    }
}
