use wasm_bindgen::prelude::*;
use eco_field::CircleStyle;

eco_field_web::export_field!(CircleStyle, "particle-background");
