pub mod binding;
pub mod conversion;
pub mod definition;
pub mod result;

pub use binding::*;
pub use conversion::*;
pub use definition::*;
pub use result::*;
