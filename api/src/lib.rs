pub mod middleware;
pub mod response;
pub mod routes;
pub mod schemas;

#[cfg(test)]
mod tests;
