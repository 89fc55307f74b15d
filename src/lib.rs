pub mod race;
pub mod report;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod test;
