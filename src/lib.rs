pub mod app;
pub mod cli;
mod commands;
pub mod context;
pub mod dto;
pub mod model;
pub mod rest;
pub mod service;
pub mod storage;
pub mod tracing;
