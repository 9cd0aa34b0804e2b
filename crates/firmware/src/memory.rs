//! Designated allocator for buffer provisioning
//!
//! All dynamic provisioning goes through one [`MemoryPool`] so a failed
//! provisioning attempt is fully reversible and leaks are observable: the
//! pool tracks bytes in use, the high-water mark and allocation/free
//! counts. In pooled mode a fixed byte budget is enforced and exhaustion
//! is an allocation failure; in heap mode only the accounting applies.
//!
//! Backing storage is the global allocator (`alloc`); on the embedded
//! target that is the `embedded-alloc` heap installed by [`crate::heap`].

use alloc::boxed::Box;
use alloc::vec;

use platform::MemoryMode;

/// An allocation was refused.
///
/// In pooled mode this means the budget would be exceeded. The request is
/// never partially satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllocError {
    /// Bytes the refused request asked for.
    pub requested: usize,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Allocation of {} bytes refused", self.requested)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Budgeted, accounted allocator front-end.
pub struct MemoryPool {
    budget: Option<usize>,
    bytes_in_use: usize,
    peak_bytes: usize,
    allocations: usize,
    frees: usize,
}

impl MemoryPool {
    /// Pool with a fixed byte budget. Requests past the budget fail.
    pub fn pooled(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            bytes_in_use: 0,
            peak_bytes: 0,
            allocations: 0,
            frees: 0,
        }
    }

    /// Unbudgeted accounting over the general heap.
    pub fn heap() -> Self {
        Self {
            budget: None,
            bytes_in_use: 0,
            peak_bytes: 0,
            allocations: 0,
            frees: 0,
        }
    }

    /// Allocator matching the board's configured memory mode.
    pub fn from_mode(mode: MemoryMode) -> Self {
        match mode {
            MemoryMode::Pool { size } => Self::pooled(size),
            MemoryMode::Heap => Self::heap(),
        }
    }

    fn admit(&mut self, len: usize) -> Result<(), AllocError> {
        let next = self
            .bytes_in_use
            .checked_add(len)
            .ok_or(AllocError { requested: len })?;
        if let Some(budget) = self.budget {
            if next > budget {
                return Err(AllocError { requested: len });
            }
        }
        self.bytes_in_use = next;
        if next > self.peak_bytes {
            self.peak_bytes = next;
        }
        self.allocations = self.allocations.saturating_add(1);
        Ok(())
    }

    fn retire(&mut self, len: usize) {
        self.bytes_in_use = self.bytes_in_use.saturating_sub(len);
        self.frees = self.frees.saturating_add(1);
    }

    /// Allocate a zeroed buffer of `len` bytes.
    pub fn alloc(&mut self, len: usize) -> Result<Box<[u8]>, AllocError> {
        self.admit(len)?;
        Ok(vec![0u8; len].into_boxed_slice())
    }

    /// Return a buffer obtained from [`MemoryPool::alloc`].
    pub fn release(&mut self, buf: Box<[u8]>) {
        self.retire(buf.len());
        drop(buf);
    }

    /// Account for a non-buffer allocation of `len` bytes (the draw-buffer
    /// descriptor object). Must be paired with [`MemoryPool::unreserve`]
    /// if the owning object is dropped during boot.
    pub fn reserve(&mut self, len: usize) -> Result<(), AllocError> {
        self.admit(len)
    }

    /// Release a [`MemoryPool::reserve`] charge.
    pub fn unreserve(&mut self, len: usize) {
        self.retire(len);
    }

    /// Bytes currently charged against the pool.
    pub fn bytes_in_use(&self) -> usize {
        self.bytes_in_use
    }

    /// Highest `bytes_in_use` ever reached.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes
    }

    /// Number of admitted allocations (buffers and reservations).
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Number of releases.
    pub fn frees(&self) -> usize {
        self.frees
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_pool_accounts_without_budget() {
        let mut pool = MemoryPool::heap();
        let buf = pool.alloc(1_024).unwrap();
        assert_eq!(pool.bytes_in_use(), 1_024);
        assert_eq!(pool.allocations(), 1);
        pool.release(buf);
        assert_eq!(pool.bytes_in_use(), 0);
        assert_eq!(pool.frees(), 1);
        assert_eq!(pool.peak_bytes(), 1_024);
    }

    #[test]
    fn test_budget_is_enforced() {
        let mut pool = MemoryPool::pooled(100);
        let buf = pool.alloc(60).unwrap();
        let err = pool.alloc(41).unwrap_err();
        assert_eq!(err.requested, 41);
        // A refused request charges nothing.
        assert_eq!(pool.bytes_in_use(), 60);
        pool.release(buf);
        assert!(pool.alloc(100).is_ok());
    }

    #[test]
    fn test_reservation_shares_the_budget() {
        let mut pool = MemoryPool::pooled(64);
        pool.reserve(40).unwrap();
        assert!(pool.alloc(32).is_err());
        pool.unreserve(40);
        assert!(pool.alloc(32).is_ok());
    }

    #[test]
    fn test_from_mode() {
        let mut pool = MemoryPool::from_mode(MemoryMode::Pool { size: 8 });
        assert!(pool.alloc(9).is_err());
        let mut heap = MemoryPool::from_mode(MemoryMode::Heap);
        assert!(heap.alloc(9).is_ok());
    }
}
