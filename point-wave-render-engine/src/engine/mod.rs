pub mod camera;
pub mod config;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod shaders;
pub mod systems;
pub mod wave;
