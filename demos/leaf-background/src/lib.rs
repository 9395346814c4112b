use wasm_bindgen::prelude::*;
use eco_field::LeafStyle;

eco_field_web::export_field!(LeafStyle, "leaf-background");
