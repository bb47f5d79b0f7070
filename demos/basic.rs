//! Basic example of using the Queens engine

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use queens_core::{Extractor, RegionGrid, Solver};

fn main() {
    // Paint a sample board screenshot: four solid quadrants
    println!("Rendering a sample 4x4 board screenshot...\n");
    let img = RgbImage::from_fn(128, 128, |x, y| match (x < 64, y < 64) {
        (true, true) => Rgb([230, 76, 60]),
        (false, true) => Rgb([46, 204, 113]),
        (true, false) => Rgb([52, 152, 219]),
        (false, false) => Rgb([241, 196, 15]),
    });
    let mut png = Cursor::new(Vec::new());
    if img.write_to(&mut png, ImageFormat::Png).is_err() {
        println!("Could not encode the sample image");
        return;
    }

    // Read the region coloring back out of the screenshot
    let grid = match Extractor::new().extract(png.get_ref(), 4, 4) {
        Ok(grid) => grid,
        Err(err) => {
            println!("Extraction failed: {err}");
            return;
        }
    };

    println!("Extracted cell colors:");
    for row in grid.hex_rows() {
        println!("  {}", row.join(" "));
    }

    // Solve the extracted board
    let solver = Solver::new();
    match grid.to_region_grid() {
        Ok(map) => {
            if let Some(placement) = solver.solve(&map) {
                println!("\nSolution:");
                print!("{placement}");
            } else {
                println!("\nThis board has no solution.");
            }
        }
        Err(err) => println!("\nNot a playable board: {err}"),
    }

    // Solve a hand-written region map
    println!("\n--- Solving a hand-written map ---\n");
    if let Ok(map) = RegionGrid::from_rows(vec![
        vec![0, 0, 0, 0, 0],
        vec![1, 1, 1, 1, 1],
        vec![2, 0, 2, 2, 0],
        vec![3, 3, 0, 3, 3],
        vec![4, 4, 4, 4, 4],
    ]) {
        if let Some(placement) = solver.solve(&map) {
            print!("{placement}");
        }
    }

    // A map the rules shut out entirely
    println!("\n--- Solving a 2x2 map ---\n");
    if let Ok(map) = RegionGrid::from_rows(vec![vec![0, 1], vec![0, 1]]) {
        match solver.solve(&map) {
            Some(placement) => print!("{placement}"),
            None => println!("No placement exists: every layout puts two markers corner to corner."),
        }
    }
}
