#![allow(dead_code)]

pub mod config;
pub mod mock_azure;
pub mod mock_supabase;
pub mod server;
