use crate::meta::Meta;

/// metadata type for location data (byte offset of a marker line)
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct LocationMeta {
    /// byte offset from the beginning of source code
    pub offset: usize,
}

impl From<usize> for LocationMeta {
    fn from(offset: usize) -> Self {
        Self { offset }
    }
}

pub trait GetLocation {
    fn get_location(&self) -> LocationMeta;
}

impl<ItemT> GetLocation for Meta<ItemT, LocationMeta> {
    fn get_location(&self) -> LocationMeta {
        *self.get_meta()
    }
}
