pub mod mutate_lecture;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;
