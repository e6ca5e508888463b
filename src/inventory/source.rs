//! The remote-query seam.

use crate::error::RemoteQueryError;

use super::VmRecord;

/// Something that can list the current virtual machines.
///
/// Implemented by the vCenter client; tests substitute in-memory fakes.
pub trait VmSource {
    /// Fetch every virtual machine record, or fail.
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError>;
}

impl<T: VmSource + ?Sized> VmSource for &T {
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        (**self).list_vms()
    }
}

impl<T: VmSource + ?Sized> VmSource for Box<T> {
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        (**self).list_vms()
    }
}
