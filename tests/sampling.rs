use grayplane::{down_sample, to_grayscale, up_sample, GrayPlaneError, PixelFormat, PixelGrid, RgbGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(rng: &mut StdRng, width: usize, height: usize) -> PixelGrid {
    PixelGrid::from_fn(width, height, |_, _| rng.random_range(0..=255)).unwrap()
}

#[test]
fn even_grids_halve_and_double() {
    let mut rng = StdRng::seed_from_u64(11);
    for (width, height) in [(2, 2), (4, 6), (10, 2), (16, 16)] {
        let grid = random_grid(&mut rng, width, height);
        let down = down_sample(&grid).unwrap();
        assert_eq!(down.dimensions(), (width / 2, height / 2));
        assert_eq!(down.format(), PixelFormat::Gray8);
        let up = up_sample(&down).unwrap();
        assert_eq!(up.dimensions(), (width, height));
    }
}

#[test]
fn up_sample_doubles_any_size() {
    let mut rng = StdRng::seed_from_u64(12);
    for (width, height) in [(1, 1), (3, 5), (7, 2)] {
        let grid = random_grid(&mut rng, width, height);
        let up = up_sample(&grid).unwrap();
        assert_eq!(up.dimensions(), (width * 2, height * 2));
    }
}

#[test]
fn down_sample_rejects_non_gray_source() {
    let rgb = RgbGrid::from_fn(4, 4, |x, y| [x as u8, y as u8, 0]).unwrap();
    let red = rgb.channel(0).unwrap();
    assert_eq!(
        down_sample(&red).err().unwrap(),
        GrayPlaneError::Format {
            expected: PixelFormat::Gray8,
            found: PixelFormat::Rgb8,
        }
    );
}

#[test]
fn uniform_gray_survives_half_and_double() {
    let rgb = RgbGrid::from_fn(4, 4, |_, _| [200, 200, 200]).unwrap();
    let gray = to_grayscale(&rgb).unwrap();
    assert_eq!(gray, PixelGrid::filled(4, 4, 200).unwrap());

    let down = down_sample(&gray).unwrap();
    assert_eq!(down, PixelGrid::filled(2, 2, 200).unwrap());

    let up = up_sample(&down).unwrap();
    assert_eq!(up, gray);
}

#[test]
fn box_filter_truncates_block_mean() {
    // Columns (0,0)=0 (0,1)=1 (1,0)=1 (1,1)=1 -> 3 / 4 = 0.
    let grid = PixelGrid::new(vec![0, 1, 1, 1], 2, 2).unwrap();
    assert_eq!(down_sample(&grid).unwrap().as_slice(), &[0]);
}

#[test]
fn up_sample_edges_average_fewer_neighbours() {
    // Single row: values 0 and 100 along x.
    let grid = PixelGrid::new(vec![0, 100], 2, 1).unwrap();
    let up = up_sample(&grid).unwrap();
    assert_eq!(up.dimensions(), (4, 2));
    // x in {0, 1} averages 0 with its right neighbour 100.
    assert_eq!(up.column(0).unwrap(), &[50, 50]);
    assert_eq!(up.column(1).unwrap(), &[50, 50]);
    // The last source column has no neighbours at all.
    assert_eq!(up.column(2).unwrap(), &[100, 100]);
    assert_eq!(up.column(3).unwrap(), &[100, 100]);
}
