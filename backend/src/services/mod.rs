pub mod imports;
pub mod labels;
