//! Predict the core temperature shift for the Boötes Void at its
//! literature parameters, calibrated against the A1_lowz anchor preset,
//! and print the prediction record as JSON.
//!
//! Run with:
//!   cargo run --example bootes_prediction

use gop_model::prelude::*;

fn main() {
    let params = VoidModelParams::default();
    let anchor = Anchor::preset("A1_lowz").expect("registered preset");
    let prediction = predict_void(&params, &anchor, &BOOTES).expect("in-domain inputs");

    let txt = serde_json::to_string_pretty(&prediction).expect("serializable record");
    println!("{txt}");
}
