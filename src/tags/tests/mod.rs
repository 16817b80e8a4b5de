mod handler;
mod service;
