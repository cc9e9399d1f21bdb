pub mod bit_manipulation;
pub mod const_num;
pub mod stats;
