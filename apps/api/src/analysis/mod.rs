// Resume analysis function: validate the request, resolve the caller, ask the
// AI gateway for a JSON analysis, validate its shape, store it, return it.
// All gateway calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod service;
