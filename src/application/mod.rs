// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No tensor math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layers 4 and 6)
//   - Only workflow coordination

// Continue every prefix in a file and write the submission
pub mod generate_use_case;

// Check that a model directory and a vocabulary belong together
pub mod inspect_use_case;
