mod basic;
mod codec;
