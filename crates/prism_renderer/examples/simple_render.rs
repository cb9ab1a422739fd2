//! Simple ray tracer example.
//!
//! Renders a basic scene with spheres and saves to PPM format.

use prism_renderer::{
    render, Camera, Color, DVec3, Light, Material, PixelBuffer, RenderConfig, Scene, Sphere,
    Viewport,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("prism Ray Tracer - Simple Example");
    println!("=================================");

    let scene = build_scene()?;
    let config = RenderConfig::default().with_sections(4).with_seed(1);

    let start = std::time::Instant::now();
    let image = render(&scene, &config)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let (width, height) = (400, 250);
    let camera = Camera::new(width, height, DVec3::new(0.0, 50.0, -500.0), DVec3::ZERO)?;

    let mut scene = Scene::new(Viewport::new(width, height), camera)
        .with_background(Color::new(0.1, 0.1, 0.2))
        .with_ambient(Color::ONE, 0.25);

    scene.add_light(Light::new(DVec3::new(-400.0, 400.0, -300.0), Color::ONE));

    let spheres = [
        (DVec3::new(0.0, 0.0, 300.0), 150.0, Color::new(0.9, 0.2, 0.1)),
        (DVec3::new(280.0, -60.0, 250.0), 90.0, Color::new(0.2, 0.8, 0.3)),
        (DVec3::new(-300.0, 40.0, 500.0), 120.0, Color::new(0.2, 0.3, 0.9)),
    ];
    for (center, radius, color) in spheres {
        let material = Material::new(color, 0.6, 0.8, 10.0);
        scene.add_object(Sphere::new(center, radius, material)?);
    }

    println!("Created {} objects", scene.object_count());
    Ok(scene)
}

fn save_ppm(image: &PixelBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    // PPM rows run top to bottom
    for y in (0..image.height()).rev() {
        for x in 0..image.width() {
            let [r, g, b] = image.get(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}
