use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::canvas::layout::{BoundsCheck, Layout};
use crate::canvas::surface::Canvas;
use crate::canvas::view::CanvasView;
use crate::composite::blend::BlendMode;
use crate::foundation::error::{PixmillError, PixmillResult};

/// Counters describing a [`BufferPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferPoolStats {
    /// Blocks waiting on the free list.
    pub free_blocks: usize,
    /// Blocks currently borrowed.
    pub in_use_blocks: usize,
    /// Pixel capacity of the free list.
    pub free_pixels: usize,
    /// Pixel capacity of borrowed blocks.
    pub in_use_pixels: usize,
    /// Borrows satisfied by a fresh allocation.
    pub allocations: u64,
    /// Borrows satisfied from the free list.
    pub reuses: u64,
}

struct Block {
    id: u64,
    data: Vec<u32>,
}

#[derive(Default)]
struct PoolState {
    free: Vec<Block>,
    // id -> capacity in pixels
    in_use: HashMap<u64, usize>,
    next_id: u64,
    stats: BufferPoolStats,
}

/// First-fit free-list allocator for scratch pixel buffers.
///
/// Blocks are never freed while the pool lives; a borrowed block is returned by dropping its
/// [`PooledBuffer`] (or [`PooledCanvas`]). The pool is single-threaded.
#[derive(Default)]
pub struct BufferPool {
    state: RefCell<PoolState>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a zeroed buffer of at least `pixel_count` pixels.
    ///
    /// The first free block large enough is reused, keeping its full capacity; otherwise a new
    /// block of exactly `pixel_count` pixels is allocated.
    pub fn borrow_buffer(&self, pixel_count: usize) -> PooledBuffer<'_> {
        let mut state = self.state.borrow_mut();

        let hit = state
            .free
            .iter()
            .position(|b| b.data.len() >= pixel_count);
        let block = match hit {
            Some(pos) => {
                let mut block = state.free.remove(pos);
                block.data.fill(0);
                state.stats.reuses += 1;
                state.stats.free_blocks -= 1;
                state.stats.free_pixels -= block.data.len();
                tracing::trace!(
                    id = block.id,
                    capacity = block.data.len(),
                    requested = pixel_count,
                    "reusing pooled buffer"
                );
                block
            }
            None => {
                let id = state.next_id;
                state.next_id += 1;
                state.stats.allocations += 1;
                tracing::debug!(id, pixels = pixel_count, "allocating pooled buffer");
                Block {
                    id,
                    data: vec![0; pixel_count],
                }
            }
        };

        state.in_use.insert(block.id, block.data.len());
        state.stats.in_use_blocks += 1;
        state.stats.in_use_pixels += block.data.len();

        PooledBuffer {
            pool: self,
            id: block.id,
            len: pixel_count,
            data: block.data,
        }
    }

    /// Give a buffer back. Equivalent to dropping it.
    pub fn return_buffer(&self, buffer: PooledBuffer<'_>) {
        drop(buffer);
    }

    /// Borrow a zeroed `width x height` scratch canvas.
    pub fn borrow_canvas(&self, width: i32, height: i32) -> PixmillResult<PooledCanvas<'_>> {
        if width < 0 || height < 0 {
            return Err(PixmillError::construction(format!(
                "invalid scratch canvas size: {width}x{height}"
            )));
        }
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| PixmillError::construction("scratch canvas size overflow"))?;

        Ok(PooledCanvas {
            buffer: self.borrow_buffer(pixels),
            layout: Layout {
                width,
                height,
                stride: width,
            },
        })
    }

    pub fn stats(&self) -> BufferPoolStats {
        self.state.borrow().stats
    }

    fn release(&self, id: u64, data: Vec<u32>) {
        let mut state = self.state.borrow_mut();
        let Some(capacity) = state.in_use.remove(&id) else {
            return;
        };
        state.stats.in_use_blocks -= 1;
        state.stats.in_use_pixels -= capacity;
        state.stats.free_blocks += 1;
        state.stats.free_pixels += capacity;
        state.free.push(Block { id, data });
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("stats", &self.stats())
            .finish()
    }
}

/// A block borrowed from a [`BufferPool`]; returned to the pool on drop.
///
/// Dereferences to the requested number of pixels. The underlying block may be larger.
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    id: u64,
    len: usize,
    data: Vec<u32>,
}

impl PooledBuffer<'_> {
    /// True size of the underlying block.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.data[..self.len]
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u32] {
        &mut self.data[..self.len]
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(self.id, std::mem::take(&mut self.data));
    }
}

impl std::fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("id", &self.id)
            .field("len", &self.len)
            .field("capacity", &self.data.len())
            .finish()
    }
}

/// A tightly packed scratch canvas backed by a pooled block.
#[derive(Debug)]
pub struct PooledCanvas<'p> {
    buffer: PooledBuffer<'p>,
    layout: Layout,
}

impl PooledCanvas<'_> {
    pub fn width(&self) -> i32 {
        self.layout.width
    }

    pub fn height(&self) -> i32 {
        self.layout.height
    }

    /// Writable canvas over the block, in overwrite mode with strict bounds.
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::from_parts(
            &mut self.buffer,
            self.layout,
            BlendMode::Overwrite,
            BoundsCheck::Strict,
        )
    }

    pub fn view(&self) -> CanvasView<'_> {
        CanvasView::from_parts(&self.buffer, self.layout, BoundsCheck::Strict)
    }
}

thread_local! {
    static DEFAULT_POOL: BufferPool = BufferPool::new();
}

/// Run `f` with this thread's default pool.
///
/// Every API that needs scratch space takes a pool argument; this is only a convenience for
/// callers that do not want to own one.
pub fn with_default_pool<R>(f: impl FnOnce(&BufferPool) -> R) -> R {
    DEFAULT_POOL.with(f)
}

#[cfg(test)]
#[path = "../../tests/unit/pool/buffer_pool.rs"]
mod tests;
