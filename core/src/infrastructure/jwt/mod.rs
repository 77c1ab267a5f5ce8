pub mod hs256_codec;
pub mod mappers;
pub mod repositories;
