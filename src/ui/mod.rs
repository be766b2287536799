pub mod panels;
pub mod result;
