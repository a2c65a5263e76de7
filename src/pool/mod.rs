//! Tile pool: an arena of tile slots with a free-list.
//!
//! Tiles are never destroyed. Releasing a tile deactivates its slot and puts
//! it on the free-list; acquiring prefers a free slot and only grows the arena
//! when none is available. The pool is unbounded and never fails.
//!
//! The pool is owned exclusively by its [`Puzzle`](crate::engine::Puzzle);
//! every mutating operation takes `&mut self`, so no two operations can
//! interleave.
//!
//! ## Usage
//!
//! ```
//! use tile_merge::pool::TilePool;
//!
//! let mut pool = TilePool::new();
//! let a = pool.acquire();
//! let b = pool.acquire();
//! assert_eq!(pool.active_count(), 2);
//!
//! assert!(pool.release(a));
//! assert!(!pool.release(a)); // idempotent
//! assert_eq!(pool.inactive_count(), 1);
//!
//! let c = pool.acquire(); // reuses a's slot
//! assert_eq!(c.index(), a.index());
//! assert_eq!(pool.count(), 2);
//! # let _ = b;
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Tile, TileId};

/// One arena slot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Slot {
    tile: Tile,
    generation: u32,
    active: bool,
}

/// Snapshot of pool occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Slots ever created.
    pub count: usize,
    /// Slots currently handed out.
    pub active: usize,
    /// Slots waiting on the free-list.
    pub inactive: usize,
}

/// Arena-backed tile pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TilePool {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl TilePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with room for `capacity` slots before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Hand out a tile, reusing a released slot when one exists.
    ///
    /// The returned tile is reset to `Tile::default()`.
    pub fn acquire(&mut self) -> TileId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.active = true;
            slot.tile = Tile::default();
            return TileId::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            tile: Tile::default(),
            generation: 0,
            active: true,
        });
        TileId::new(index, 0)
    }

    /// Return a tile to the pool.
    ///
    /// Returns `false` (and does nothing) if `id` is already released or stale.
    pub fn release(&mut self, id: TileId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if !slot.active || slot.generation != id.generation() {
            return false;
        }
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index() as u32);
        true
    }

    /// Release every active tile.
    pub fn release_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.active {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
    }

    /// Is `id` a live handle?
    #[must_use]
    pub fn is_active(&self, id: TileId) -> bool {
        self.slot(id).is_some()
    }

    /// Get a live tile.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slot(id).map(|slot| &slot.tile)
    }

    /// Get a live tile mutably.
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.active && slot.generation == id.generation())
            .map(|slot| &mut slot.tile)
    }

    /// Total slots ever created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently handed out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots on the free-list.
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            count: self.count(),
            active: self.active_count(),
            inactive: self.inactive_count(),
        }
    }

    fn slot(&self, id: TileId) -> Option<&Slot> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.active && slot.generation == id.generation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_grows_when_empty() {
        let mut pool = TilePool::new();
        let a = pool.acquire();
        let b = pool.acquire();

        assert_ne!(a.index(), b.index());
        assert_eq!(pool.count(), 2);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.inactive_count(), 0);
    }

    #[test]
    fn test_acquire_reuses_released_slot() {
        let mut pool = TilePool::new();
        let a = pool.acquire();
        pool.get_mut(a).unwrap().value = 64;
        pool.release(a);

        let b = pool.acquire();
        assert_eq!(b.index(), a.index());
        assert_eq!(pool.count(), 1);
        // Reacquired tiles start clean.
        assert_eq!(pool.get(b).unwrap().value(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = TilePool::new();
        let a = pool.acquire();

        assert!(pool.release(a));
        assert!(!pool.release(a));
        assert_eq!(pool.inactive_count(), 1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_stale_id_does_not_alias() {
        let mut pool = TilePool::new();
        let a = pool.acquire();
        pool.release(a);
        let b = pool.acquire();

        assert!(pool.get(a).is_none());
        assert!(pool.get_mut(a).is_none());
        assert!(!pool.release(a));
        assert!(pool.is_active(b));
    }

    #[test]
    fn test_release_unknown_id() {
        let mut pool = TilePool::new();
        assert!(!pool.release(TileId::new(5, 0)));
        assert!(pool.get(TileId::new(5, 0)).is_none());
    }

    #[test]
    fn test_release_all() {
        let mut pool = TilePool::with_capacity(8);
        let ids: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        pool.release(ids[2]);

        pool.release_all();

        assert_eq!(
            pool.stats(),
            PoolStats {
                count: 5,
                active: 0,
                inactive: 5
            }
        );
        assert!(ids.iter().all(|&id| !pool.is_active(id)));

        // Everything comes back from the free-list before the arena grows.
        for _ in 0..5 {
            pool.acquire();
        }
        assert_eq!(pool.count(), 5);
        pool.acquire();
        assert_eq!(pool.count(), 6);
    }
}
