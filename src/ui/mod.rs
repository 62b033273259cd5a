pub mod controls;
pub mod panels;
pub mod pie;
pub mod scatter;
