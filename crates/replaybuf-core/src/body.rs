//! Byte body accumulator.
//!
//! [`ByteBody`] collects consecutive byte writes. Owned `Bytes` are stored
//! as-is; a borrowed slice is copied once into its own frozen chunk. On
//! replay the body is handed out as one contiguous `Bytes`, by refcount
//! when the body is a single stored chunk, otherwise by one concatenating
//! copy.

use bytes::{Bytes, BytesMut};

/// Accumulated payload of a `WriteBytes` entry.
#[derive(Debug, Clone, Default)]
pub struct ByteBody {
    chunks: Vec<Bytes>,
    len: usize,
}

impl ByteBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an owned chunk. The chunk is stored without copying.
    pub(crate) fn push(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push(chunk);
    }

    /// Append a borrowed slice. The slice is copied once, into a frozen
    /// chunk that replay can hand out by refcount.
    pub(crate) fn extend_from_slice(&mut self, data: &[u8]) {
        self.push(Bytes::copy_from_slice(data));
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of separately stored regions backing this body.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if [`to_bytes()`](ByteBody::to_bytes) can hand out
    /// the stored region without copying.
    pub fn is_contiguous(&self) -> bool {
        self.chunks.len() <= 1
    }

    /// The whole body as one contiguous buffer.
    ///
    /// A single stored chunk is returned by refcount and shares its
    /// allocation. Anything else is copied once into a buffer sized to the
    /// total length.
    pub fn to_bytes(&self) -> Bytes {
        match self.chunks.as_slice() {
            [] => Bytes::new(),
            [single] => single.clone(),
            chunks => {
                let mut out = BytesMut::with_capacity(self.len);
                for chunk in chunks {
                    out.extend_from_slice(chunk);
                }
                out.freeze()
            }
        }
    }

    /// Iterate the stored regions in write order.
    pub fn chunks(&self) -> impl Iterator<Item = &Bytes> {
        self.chunks.iter()
    }
}

impl PartialEq for ByteBody {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .chunks()
                .flatten()
                .eq(other.chunks().flatten())
    }
}

impl Eq for ByteBody {}

impl From<Bytes> for ByteBody {
    fn from(chunk: Bytes) -> Self {
        let mut body = ByteBody::new();
        body.push(chunk);
        body
    }
}
