//! Arena allocation for the parser.
//!
//! All nodes of a tree are allocated from a bump arena. An incremental
//! update allocates its new nodes in the same arena as the tree it
//! updates, so reused subtrees stay valid by reference.

use bumpalo::Bump;

/// The parse arena wraps a bump allocator for all node allocations.
///
/// When the tree is no longer needed the entire arena is freed at once
/// (O(1) deallocation).
pub struct ParseArena {
    bump: Bump,
}

impl ParseArena {
    /// Create a new parse arena with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new parse arena with the specified initial capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Allocate a value in the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocate a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Move the elements of a vector into an arena-allocated slice.
    #[inline]
    pub fn alloc_vec<T>(&self, vec: Vec<T>) -> &[T] {
        if vec.is_empty() {
            return &[];
        }
        self.bump.alloc_slice_fill_iter(vec)
    }

    /// Returns the total bytes allocated in this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reset the arena, deallocating all objects but keeping the memory.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for ParseArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_vec_moves_elements() {
        let arena = ParseArena::new();
        let slice = arena.alloc_vec(vec![1u32, 2, 3]);
        assert_eq!(slice, &[1, 2, 3]);
        let empty: &[u32] = arena.alloc_vec(Vec::new());
        assert!(empty.is_empty());
    }
}
