//! Classified Boundary
//!
//! Payloads are copied into a `ClassifiedBuffer` owned by the `Boundary`
//! and zeroed when the buffer is replaced, wiped or dropped.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::mediation::Anomaly;

/// Largest buffer the boundary will allocate
pub const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Fixed-capacity byte region that is unusable once wiped
pub struct ClassifiedBuffer {
    data: Vec<u8>,
    valid: bool,
}

impl ClassifiedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            valid: true,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Copy `input` into the start of the buffer
    pub fn write(&mut self, input: &[u8]) -> Result<(), Anomaly> {
        if !self.valid {
            return Err(Anomaly::BufferInvalidated);
        }
        if input.len() > self.data.len() {
            return Err(Anomaly::BufferOverflow {
                capacity: self.data.len(),
                requested: input.len(),
            });
        }
        self.data[..input.len()].copy_from_slice(input);
        Ok(())
    }

    /// Copy of the whole buffer
    pub fn read(&self) -> Result<Zeroizing<Vec<u8>>, Anomaly> {
        if !self.valid {
            return Err(Anomaly::BufferInvalidated);
        }
        Ok(Zeroizing::new(self.data.clone()))
    }

    pub fn wipe(&mut self) {
        self.data.zeroize();
        self.valid = false;
    }
}

impl Drop for ClassifiedBuffer {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for ClassifiedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedBuffer")
            .field("capacity", &self.data.len())
            .field("valid", &self.valid)
            .finish()
    }
}

/// Execution boundary holding at most one live buffer
#[derive(Debug, Default)]
pub struct Boundary {
    active: bool,
    buffer: Option<ClassifiedBuffer>,
}

impl Boundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Allocate a fresh buffer, wiping any previous one
    pub fn allocate_buffer(&mut self, size: usize) -> Result<&mut ClassifiedBuffer, Anomaly> {
        if !self.active {
            return Err(Anomaly::BoundaryInactive);
        }
        if size > MAX_BUFFER_SIZE {
            return Err(Anomaly::BufferOverflow {
                capacity: MAX_BUFFER_SIZE,
                requested: size,
            });
        }
        Ok(self.buffer.insert(ClassifiedBuffer::new(size)))
    }

    pub fn buffer(&self) -> Option<&ClassifiedBuffer> {
        self.buffer.as_ref()
    }

    /// Wipe the buffer and deactivate
    pub fn destroy(&mut self) {
        if let Some(mut buffer) = self.buffer.take() {
            buffer.wipe();
        }
        self.active = false;
    }
}
