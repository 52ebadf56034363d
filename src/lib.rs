use crate::graph::StateSet;


pub mod closure;
pub mod graph;
pub mod playback;
pub mod render;
pub mod session;
pub mod traversal;

/// A utility method for printing a state set in log messages.
fn log_states(set: &StateSet) -> String {
    let states = set.iter().map(|it| it.to_string()).collect::<Vec<_>>();
    format!("states={}; {{{}}}", set.len(), states.join(", "))
}

/// Extract the "simple name" of a type argument at compile time.
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
