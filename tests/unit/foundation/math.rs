use super::*;

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    assert_eq!(lerp_u8(10, 200, 0.0), 10);
    assert_eq!(lerp_u8(10, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 100, 0.5), 50);
    assert_eq!(lerp_u8(200, 0, 2.0), 0);
}
