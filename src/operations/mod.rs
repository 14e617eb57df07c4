pub mod constraint;
pub mod decompose;
pub mod estimate;
pub mod footprint;
pub mod layout;
