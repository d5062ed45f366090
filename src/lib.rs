pub mod biomech;
pub mod coach;
pub mod config;
pub mod exercise;
pub mod pose;
pub mod session;
pub mod template;

#[cfg(test)]
pub mod testutil;
