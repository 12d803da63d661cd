//! Entry point for the WASM application

pub fn main() {
    gnome_frontend::start();
}
