//! Tests for bounding box parsing and geometry.

use scene_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.to_array(), [-180.0, -90.0, 180.0, 90.0]);
}

#[test]
fn test_bbox_width_height() {
    let bbox = BoundingBox::new(10.0, 5.0, 30.0, 25.0);
    assert_eq!(bbox.width(), 20.0);
    assert_eq!(bbox.height(), 20.0);
}

// ============================================================================
// from_query_string tests
// ============================================================================

#[test]
fn test_parse_integer_values() {
    let bbox = BoundingBox::from_query_string("0,0,100,100").unwrap();
    assert_eq!(bbox.to_array(), [0.0, 0.0, 100.0, 100.0]);
}

#[test]
fn test_parse_scientific_notation() {
    let bbox = BoundingBox::from_query_string("1e-6,2e-6,1e6,2e6").unwrap();
    assert!((bbox.min_x - 1e-6).abs() < 1e-12);
    assert!((bbox.max_y - 2e6).abs() < 1e-6);
}

#[test]
fn test_parse_tolerates_whitespace() {
    let bbox = BoundingBox::from_query_string(" -122.3, 47.5 ,-121.9 ,47.7 ").unwrap();
    assert_eq!(bbox.to_array(), [-122.3, 47.5, -121.9, 47.7]);
}

#[test]
fn test_parse_no_ordering_check() {
    // min > max is accepted as-is
    let bbox = BoundingBox::from_query_string("10,10,5,5").unwrap();
    assert_eq!(bbox.width(), -5.0);
}

#[test]
fn test_parse_too_few_values() {
    let result = BoundingBox::from_query_string("1,2,3");
    assert_eq!(result, Err(BboxParseError::WrongCount(3)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Bounding box must contain exactly 4 values (x1, y1, x2, y2)."
    );
}

#[test]
fn test_parse_too_many_values() {
    let result = BoundingBox::from_query_string("0,0,100,100,200");
    assert_eq!(result, Err(BboxParseError::WrongCount(5)));
}

#[test]
fn test_parse_non_numeric() {
    let result = BoundingBox::from_query_string("a,b,c,d");
    assert_eq!(result, Err(BboxParseError::InvalidNumber));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Bounding box values must be valid floats in the format 'x1,y1,x2,y2'."
    );
}

#[test]
fn test_parse_empty_string() {
    // A single empty token is not a number
    let result = BoundingBox::from_query_string("");
    assert_eq!(result, Err(BboxParseError::InvalidNumber));
}

#[test]
fn test_parse_trailing_comma() {
    let result = BoundingBox::from_query_string("1,2,3,4,");
    assert_eq!(result, Err(BboxParseError::InvalidNumber));
}

// ============================================================================
// densify tests
// ============================================================================

#[test]
fn test_densify_points_stay_on_outline() {
    let bbox = BoundingBox::new(-1.0, -2.0, 3.0, 4.0);
    for (x, y) in bbox.densify(10) {
        let on_vertical = x == bbox.min_x || x == bbox.max_x;
        let on_horizontal = y == bbox.min_y || y == bbox.max_y;
        assert!(on_vertical || on_horizontal, "({}, {}) off outline", x, y);
        assert!(x >= bbox.min_x && x <= bbox.max_x);
        assert!(y >= bbox.min_y && y <= bbox.max_y);
    }
}
