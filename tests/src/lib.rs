//! End-to-end tests for the flowtag pipeline over the files in `fixtures/`.

#[cfg(test)]
mod pipeline;
