pub mod period;
pub mod table;
pub mod tier;
