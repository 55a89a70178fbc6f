use chrono::NaiveDate;

use crate::errors::InternalError;
use crate::stores::FestivalStore;
use crate::types::internal::{NewFestival, Region};

struct DemoFestival {
    name: &'static str,
    location: &'static str,
    region: Region,
    address: &'static str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    description: &'static str,
    website: Option<&'static str>,
    latitude: f64,
    longitude: f64,
}

const DEMO_FESTIVALS: [DemoFestival; 5] = [
    DemoFestival {
        name: "Oktoberfest",
        location: "München, Bayern",
        region: Region::Bayern,
        address: "Theresienwiese, 80336 München",
        start: (2025, 9, 21),
        end: (2025, 10, 6),
        description: "Das weltberühmte Bierfest mit traditioneller Musik, Trachten und bayerischer Kultur.",
        website: Some("https://www.oktoberfest.de"),
        latitude: 48.1351,
        longitude: 11.5820,
    },
    DemoFestival {
        name: "Almabtrieb",
        location: "Mayrhofen, Tirol",
        region: Region::Tirol,
        address: "Ortszentrum, 6290 Mayrhofen",
        start: (2025, 9, 26),
        end: (2025, 9, 26),
        description: "Traditionelles Fest zur Rückkehr der Kühe von den Almen ins Tal mit festlich geschmückten Tieren.",
        website: None,
        latitude: 47.1639,
        longitude: 11.8656,
    },
    DemoFestival {
        name: "Salzburger Festspiele",
        location: "Salzburg, Österreich",
        region: Region::Oesterreich,
        address: "Hofstallgasse 1, 5020 Salzburg",
        start: (2025, 7, 18),
        end: (2025, 8, 30),
        description: "Eines der bedeutendsten Festivals für Oper, Theater und klassische Musik in Europa.",
        website: Some("https://www.salzburgerfestspiele.at"),
        latitude: 47.8095,
        longitude: 13.0550,
    },
    DemoFestival {
        name: "Nürnberger Christkindlesmarkt",
        location: "Nürnberg, Bayern",
        region: Region::Bayern,
        address: "Hauptmarkt, 90403 Nürnberg",
        start: (2025, 11, 28),
        end: (2025, 12, 24),
        description: "Einer der ältesten und bekanntesten Weihnachtsmärkte Deutschlands.",
        website: Some("https://www.christkindlesmarkt.de"),
        latitude: 49.4521,
        longitude: 11.0767,
    },
    DemoFestival {
        name: "Wiener Opernball",
        location: "Wien, Österreich",
        region: Region::Oesterreich,
        address: "Opernring 2, 1010 Wien",
        start: (2025, 2, 20),
        end: (2025, 2, 20),
        description: "Gesellschaftliches Großereignis der Wiener Ballsaison in der Wiener Staatsoper.",
        website: None,
        latitude: 48.2035,
        longitude: 16.3694,
    },
];

fn ymd((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, InternalError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| InternalError::validation(format!("Invalid date {}-{}-{}", year, month, day)))
}

/// Insert the demo festivals when the festival table is empty
///
/// # Returns
/// Number of festivals inserted; 0 when festivals already exist
pub async fn seed_demo(festival_store: &FestivalStore) -> Result<usize, InternalError> {
    let existing = festival_store.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Festival table not empty, skipping demo seed");
        return Ok(0);
    }

    for demo in &DEMO_FESTIVALS {
        let festival = NewFestival {
            name: demo.name.to_string(),
            description: demo.description.to_string(),
            location: demo.location.to_string(),
            region: demo.region,
            address: demo.address.to_string(),
            start_date: ymd(demo.start)?,
            end_date: ymd(demo.end)?,
            image_url: None,
            website: demo.website.map(str::to_string),
            entry_fee: None,
            latitude: demo.latitude,
            longitude: demo.longitude,
        };
        festival_store.insert(festival, None).await?;
    }

    tracing::info!(count = DEMO_FESTIVALS.len(), "Demo festivals seeded");
    Ok(DEMO_FESTIVALS.len())
}
