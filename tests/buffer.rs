use boomplot::data::buffer::SampleBuffer;
use boomplot::ConfigError;

#[test]
fn keeps_last_capacity_values_in_order() {
    let mut buf = SampleBuffer::new(4).unwrap();
    for v in 0..10 {
        buf.push(v as f64);
    }
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.snapshot(), vec![6.0, 7.0, 8.0, 9.0]);
    assert_eq!(buf.latest(), Some(9.0));
    assert_eq!(buf.total_pushed(), 10);
}

#[test]
fn partial_fill_has_no_padding() {
    let mut buf = SampleBuffer::new(300).unwrap();
    buf.extend([1.0, 2.0]);
    assert_eq!(buf.len(), 2);
    assert_eq!(buf.snapshot(), vec![1.0, 2.0]);
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(matches!(SampleBuffer::new(0), Err(ConfigError::ZeroCapacity)));
}

#[test]
fn clear_empties_the_buffer() {
    let mut buf = SampleBuffer::new(3).unwrap();
    buf.extend([1.0, 2.0, 3.0, 4.0]);
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.latest(), None);
    buf.push(5.0);
    assert_eq!(buf.snapshot(), vec![5.0]);
}
