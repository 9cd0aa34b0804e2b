//! Embedded heap backing dynamic provisioning
//!
//! The target has no OS allocator, so `alloc` is served by a linked-list
//! heap over a static arena. Host builds and tests use the std allocator
//! and never compile this module.

use core::mem::MaybeUninit;

use embedded_alloc::LlffHeap as Heap;
use static_cell::ConstStaticCell;

#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Arena size: two full RGB565 frames plus provisioning overhead.
pub const HEAP_SIZE: usize = 256 * 1024;

// ConstStaticCell keeps the arena out of any stack frame.
static ARENA: ConstStaticCell<[MaybeUninit<u8>; HEAP_SIZE]> =
    ConstStaticCell::new([MaybeUninit::uninit(); HEAP_SIZE]);

/// Hand the arena to the allocator. Must run before the first allocation;
/// a second call panics inside `static_cell`.
pub fn init() {
    let arena = ARENA.take();
    // SAFETY: `take` yields the arena exactly once, and `init` runs before
    // any allocation can occur.
    unsafe { HEAP.init(arena.as_mut_ptr() as usize, HEAP_SIZE) }
}
