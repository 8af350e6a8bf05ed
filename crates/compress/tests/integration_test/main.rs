/// Integration tests for the compression pipeline covering the end-to-end
/// convergence scenario, oversized paragraphs, the depth guard and output
/// persistence.

mod depth_guard;
mod helpers;
mod oversized;
mod pipeline;
