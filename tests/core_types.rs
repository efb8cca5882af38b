use slidematch::{
    ImageView, OffsetSolver, OwnedImage, ScoreSurface, SlideError, Template, TemplatePlan,
};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        SlideError::InvalidDimensions {
            width: 0,
            height: 1,
            context: "image",
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert!(matches!(err, SlideError::InvalidDimensions { .. }));
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        SlideError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_short_buffer() {
    let data = [0u8; 5];
    let err = ImageView::from_slice(&data, 3, 2).err().unwrap();
    assert_eq!(err, SlideError::BufferTooSmall { needed: 6, got: 5 });
}

#[test]
fn roi_keeps_parent_stride() {
    let data: Vec<u8> = (0..30).collect();
    let view = ImageView::new(&data, 5, 5, 6).unwrap();
    let roi = view.roi(1, 2, 3, 2).unwrap();

    assert_eq!(roi.stride(), 6);
    assert_eq!(roi.row(0).unwrap(), &[13, 14, 15]);
    assert_eq!(roi.row(1).unwrap(), &[19, 20, 21]);
    assert_eq!(roi.get(2, 1).copied(), Some(21));
    assert_eq!(roi.get(3, 0), None);
    assert_eq!(roi.to_vec(), vec![13, 14, 15, 19, 20, 21]);

    assert!(view.roi(3, 0, 3, 1).is_err());
    assert!(view.roi(0, 0, 0, 1).is_err());
}

#[test]
fn owned_image_round_trips_views() {
    let data: Vec<u8> = (0..12).collect();
    let padded = ImageView::new(&data, 3, 3, 4).unwrap();
    let owned = OwnedImage::from_view(padded).unwrap();

    assert_eq!(owned.width(), 3);
    assert_eq!(owned.height(), 3);
    assert_eq!(owned.data(), &[0, 1, 2, 4, 5, 6, 8, 9, 10]);
    assert_eq!(owned.view().stride(), 3);

    let err = OwnedImage::new(vec![0; 5], 3, 2).unwrap_err();
    assert_eq!(err, SlideError::BufferTooSmall { needed: 6, got: 5 });
}

#[test]
fn template_plan_holds_exact_moments() {
    let data = [0u8, 255, 255, 0, 0, 255];
    let view = ImageView::from_slice(&data, 3, 2).unwrap();
    let plan = TemplatePlan::from_view(view).unwrap();

    assert_eq!(plan.len(), 6);
    assert!(!plan.is_empty());
    assert_eq!(plan.sum(), 3 * 255);
    assert_eq!(plan.sum_sq(), 3 * 255 * 255);
    assert_eq!(plan.row(1), &[0, 0, 255]);
    assert!((plan.mean() - 127.5).abs() < 1e-9);
    assert!((plan.variance() - 127.5 * 127.5).abs() < 1e-6);
}

#[test]
fn shared_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Template>();
    assert_send_sync::<TemplatePlan>();
    assert_send_sync::<ScoreSurface>();
    assert_send_sync::<OffsetSolver>();
}
