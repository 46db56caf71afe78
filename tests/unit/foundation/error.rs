use super::*;

#[test]
fn messages_carry_their_category_prefix() {
    let cases = [
        (WhipcutError::validation("x"), "validation error:"),
        (WhipcutError::dimension_mismatch("x"), "dimension mismatch:"),
        (WhipcutError::invalid_step_count("x"), "invalid step count:"),
        (WhipcutError::io("x"), "io error:"),
    ];
    for (err, prefix) in cases {
        let shown = err.to_string();
        assert!(shown.contains(prefix), "{shown:?} is missing {prefix:?}");
    }
}

#[test]
fn wrapped_errors_keep_their_message() {
    let err = WhipcutError::Other(anyhow::Error::new(std::io::Error::other("pipe fell over")));
    assert!(err.to_string().contains("pipe fell over"));
}
