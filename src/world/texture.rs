// Build-once repository of decoded wall textures.
// The caster interacts through `SourceId` only; decoding happens upstream.

use crate::world::SourceId;

/// Texel columns per texture. Every wall texture is the same fixed size.
pub const TEX_WIDTH: usize = 64;
/// Texel rows per texture.
pub const TEX_HEIGHT: usize = 64;
/// Byte length of one decoded texture: 3 channels per texel.
pub const TEXELS_LEN: usize = TEX_WIDTH * TEX_HEIGHT * 3;

/// Things that can go wrong while building the cache.
///
/// All of them are build-time diagnostics; a cache that built successfully
/// never fails a lookup for a registered id.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// A source supplied a texel buffer of the wrong size.
    #[error("source id {id}: texel buffer is {got} bytes, expected {TEXELS_LEN}")]
    BadLength { id: SourceId, got: usize },

    /// The same source id appeared twice in the build set.
    #[error("source id {0} registered twice")]
    Duplicate(SourceId),
}

/// Immutable source-id → texel-buffer cache.
///
/// Two-phase lifecycle: [`TextureCache::build`] ingests every source the
/// map can reference, then rendering performs read-only [`texels`] lookups.
/// There is no eviction and no lazy fill — a map change means a rebuild.
///
/// Sparse external ids are remapped once into dense storage slots, so a
/// lookup is two indexed loads regardless of how scattered the id space is.
///
/// [`texels`]: TextureCache::texels
#[derive(Debug)]
pub struct TextureCache {
    /// `remap[id] = storage slot`; `None` for ids never registered.
    remap: Vec<Option<u16>>,
    data: Vec<Box<[u8]>>,
}

impl TextureCache {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Ingest the full set of `(source id, decoded 64×64×3 bytes)` pairs.
    ///
    /// Texel bytes are stored verbatim; channel order is whatever the
    /// decoder produced. Malformed input is rejected here, never deferred
    /// to render time.
    pub fn build<I>(sources: I) -> Result<Self, TextureError>
    where
        I: IntoIterator<Item = (SourceId, Vec<u8>)>,
    {
        let sources: Vec<(SourceId, Vec<u8>)> = sources.into_iter().collect();

        let max_id = sources.iter().map(|&(id, _)| id).max().unwrap_or(0);
        let mut remap = vec![None; max_id as usize + 1];
        let mut data = Vec::with_capacity(sources.len());

        for (id, texels) in sources {
            if texels.len() != TEXELS_LEN {
                return Err(TextureError::BadLength {
                    id,
                    got: texels.len(),
                });
            }
            let slot = &mut remap[id as usize];
            if slot.is_some() {
                return Err(TextureError::Duplicate(id));
            }
            *slot = Some(data.len() as u16);
            data.push(texels.into_boxed_slice());
        }

        Ok(Self { remap, data })
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `id` was part of the build set.
    pub fn contains(&self, id: SourceId) -> bool {
        matches!(self.remap.get(id as usize), Some(Some(_)))
    }

    /// Texel bytes for a registered source id, `TEXELS_LEN` long.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not registered. The grid only yields occupant
    /// ids and every occupant id must be in the build set, so an
    /// unregistered lookup is a data-integrity bug; substituting a
    /// fallback texture here would mask it.
    pub fn texels(&self, id: SourceId) -> &[u8] {
        let slot = self
            .remap
            .get(id as usize)
            .copied()
            .flatten()
            .unwrap_or_else(|| panic!("texture lookup for unregistered source id {id}"));
        &self.data[slot as usize]
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
