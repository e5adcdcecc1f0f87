pub mod gateway;
pub mod subscription;
