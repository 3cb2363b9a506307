mod test_error_handling;
mod test_rendering;
