#![expect(unsafe_code, reason = "Writing through schema offsets requires raw pointers.")]

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::field::FieldHeader;
use crate::path::FieldPath;

// -----------------------------------------------------------------------------
// InstancePtr

/// A type-erased mutable pointer to the root of an instance being linked.
///
/// Borrows the instance mutably for `'a`, so no other access can observe a
/// half-linked value.
pub(crate) struct InstancePtr<'a>(NonNull<u8>, PhantomData<&'a mut u8>);

impl<'a> InstancePtr<'a> {
    #[inline(always)]
    pub fn new<T>(instance: &'a mut T) -> Self {
        Self(NonNull::from(instance).cast::<u8>(), PhantomData)
    }

    #[cfg(all(debug_assertions, feature = "debug"))]
    #[inline(never)]
    fn debug_assert_aligned<T>(&self) {
        debug_assert!(
            self.0.cast::<T>().is_aligned(),
            "pointer is not aligned. Address {:p} does not have alignment {} for type {}",
            self.0,
            align_of::<T>(),
            core::any::type_name::<T>(),
        );
    }

    /// Calculates the offset from the pointer, in raw bytes.
    ///
    /// # Safety
    /// `count` must stay inside the pointee.
    #[inline(always)]
    pub unsafe fn byte_add(&mut self, count: usize) -> InstancePtr<'_> {
        // SAFETY: The caller ensures the result stays in bounds.
        InstancePtr(unsafe { self.0.add(count) }, PhantomData)
    }

    /// Stores `path` in the [`FieldHeader`] at this address.
    ///
    /// # Safety
    /// The pointer must address a `Field<_>`.
    #[inline(always)]
    pub unsafe fn write_path(self, path: &'static FieldPath) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        self.debug_assert_aligned::<FieldHeader>();

        let header = self.0.cast::<FieldHeader>().as_ptr();
        // SAFETY: `Field<_>` starts with the layout of `FieldHeader`.
        unsafe {
            (&raw mut (*header).path).write(Some(path));
        }
    }
}
