use std::io::Cursor;

use image::{ImageBuffer, Rgb};
use muk_core::Error;
use muk_core::prelude::*;
use muk_memory_storage::MukMemoryStorage;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Render a synthetic "photo" so the example runs without fixture files
fn synthetic_photo(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 5 + y) % 256) as u8,
            ((y * 3 + x) % 256) as u8,
            ((x + y) % 256) as u8,
        ])
    });
    let mut data = Vec::new();
    img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
        .expect("encoding a fresh buffer cannot fail");
    data
}

fn main() -> Result<(), Error> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let muk = MUK::new(MukMemoryStorage::default());
    let uploads = muk.listing_uploads("seller-1");

    // A 4000x3000 original, far over the 200 KiB budget before normalization
    let oversized = synthetic_photo(4000, 3000);
    tracing::info!(input_bytes = oversized.len(), "submitting listing images");

    let draft = ListingDraft {
        title: "Mythic #120 \u{2605} 70 Skins".to_string(),
        description: "Rank transfer included, MMR 9400".to_string(),
        price: 199.0,
    };
    let files = vec![
        ListingImageFile {
            name: "front.png".to_string(),
            data: oversized,
        },
        ListingImageFile {
            name: "inventory screenshot.png".to_string(),
            data: synthetic_photo(1280, 720),
        },
    ];

    let listing = uploads.create_listing(&draft, &files)?;

    tracing::info!(
        listing_id = %listing.id,
        images = listing.image_urls.len(),
        "listing created"
    );
    for url in &listing.image_urls {
        tracing::info!(%url, "image available");
    }

    Ok(())
}
