//! Populate a database with sample parish content.
//!
//! Fixture text reuses a small pool of church-flavoured phrases; translations
//! are filled for titles and duplicated for long-form content, which is fine
//! for fixtures (the site falls back to English for blank variants anyway).

use anyhow::Result;
use chrono::{Duration, Utc};
use parish_site::config::Config;
use parish_site::db::Database;
use parish_site::models::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

const EVENT_TITLES: &[(&str, &str, &str, &str)] = &[
    (
        "Community Prayer Gathering",
        "Rassemblement de prière communautaire",
        "Iteraniro ry'amasengesho",
        "Mkutano wa maombi ya pamoja",
    ),
    (
        "Youth Faith Retreat",
        "Retraite de foi des jeunes",
        "Urugendo rw'ukwemera rw'urubyiruko",
        "Mafungo ya imani ya vijana",
    ),
    (
        "Charity Outreach Program",
        "Programme de charité",
        "Gahunda y'ubugiraneza",
        "Programu ya misaada",
    ),
    (
        "Adoration and Praise Night",
        "Nuit d'adoration et de louange",
        "Ijoro ryo gusenga no gushimira",
        "Usiku wa kuabudu na kusifu",
    ),
    (
        "Family Worship Service",
        "Culte familial",
        "Igitambo cy'umuryango",
        "Ibada ya familia",
    ),
    (
        "Easter Vigil Mass",
        "Veillée pascale",
        "Igitaramo cya Pasika",
        "Mkesha wa Pasaka",
    ),
    (
        "Christmas Carol Celebration",
        "Célébration des chants de Noël",
        "Umunsi w'indirimbo za Noheli",
        "Sherehe ya nyimbo za Krismasi",
    ),
    (
        "Healing Service and Prayers",
        "Service de guérison et prières",
        "Igikorwa cyo gukiza n'amasengesho",
        "Ibada ya uponyaji na maombi",
    ),
];

const HOMILY_TITLES: &[(&str, &str, &str, &str)] = &[
    (
        "The Good Samaritan",
        "Le bon Samaritain",
        "Umusamariya mwiza",
        "Msamaria mwema",
    ),
    (
        "The Prodigal Son",
        "Le fils prodigue",
        "Umwana w'ikirara",
        "Mwana mpotevu",
    ),
    (
        "The Beatitudes",
        "Les Béatitudes",
        "Ibyishimo",
        "Heri za Mlimani",
    ),
    (
        "The Lord's Prayer",
        "Le Notre Père",
        "Isengesho ry'Umwami",
        "Sala ya Bwana",
    ),
    (
        "Walking in the Light",
        "Marcher dans la lumière",
        "Kugendera mu mucyo",
        "Kutembea nuruni",
    ),
];

const PRAYER_TITLES: &[&str] = &[
    "Prayer for the Sick",
    "Prayer for Families",
    "Prayer for Peace",
    "Prayer of Thanksgiving",
    "Prayer for Strength",
];

const ROOM_NAMES: &[&str] = &[
    "Garden Suite",
    "Chapel View Room",
    "Pilgrim Studio",
    "Olive Deluxe",
    "Cedar Room",
    "Jordan Suite",
    "Bethany Studio",
    "Tabor Room",
];

const AMENITIES: &[&str] = &[
    "Free WiFi",
    "Air Conditioning",
    "Breakfast Included",
    "Parking",
    "Pool Access",
    "Gym Access",
    "Pet Friendly",
    "Room Service",
];

const MEMBER_NAMES: &[&str] = &[
    "Fr. Emmanuel Nkurunziza",
    "Fr. Jean-Bosco Habimana",
    "Sr. Marie-Claire Uwase",
    "Deacon Samuel Mugisha",
    "Chantal Mukamana",
    "Eric Niyonzima",
    "Josiane Ingabire",
    "Pascal Hakizimana",
    "Claudine Uwamahoro",
    "Thierry Ndayisenga",
];

const MEMBER_ROLES: &[&str] = &[
    "Priest",
    "Priest",
    "Catechist",
    "Deacon",
    "Choir Member",
    "Usher",
    "Secretary",
    "Choir Member",
    "Catechist",
    "Usher",
];

const TESTIMONY_AUTHORS: &[&str] = &["Agnes", "Jean", "Divine", "Patrick", "Solange", "Innocent"];

const CITIES: &[&str] = &["Kigali", "Huye", "Musanze", "Rubavu", "Nyagatare"];

fn paragraph(rng: &mut impl Rng, topic: &str) -> String {
    let sentences = [
        format!("This gathering draws our community together around {topic}."),
        "We come together in faith and fellowship, offering spiritual nourishment and uplifting worship.".to_string(),
        "Everyone is welcome, whether you have been with the parish for years or are visiting for the first time.".to_string(),
        "Bring your family and neighbours; refreshments follow in the parish hall.".to_string(),
        "Those who wish to serve can sign up with the parish office during the week.".to_string(),
    ];
    let count = rng.gen_range(3..=sentences.len());
    sentences[..count].join(" ")
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seed=info".parse()?),
        )
        .init();

    info!("Seeding parish content");

    let config = Config::from_env()?;
    let db = Database::new(&config.database_path)?;
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    // Two masses a day for the past three months, like the printed schedule.
    let mut schedules = 0;
    for day_offset in 0..90 {
        let date = (today - Duration::days(day_offset)).format("%Y-%m-%d").to_string();
        for (mass_type, start, end, title) in [
            (MassType::Morning, "08:00", "09:00", "Morning Mass"),
            (MassType::Evening, "18:00", "19:00", "Evening Mass"),
        ] {
            db.insert_mass_schedule(&NewMassSchedule {
                date: date.clone(),
                start_time: start.into(),
                end_time: end.into(),
                mass_type,
                title: LocalizedText::uniform(title),
                description: LocalizedText::default(),
            })?;
            schedules += 1;
        }
    }
    info!("✓ Created {schedules} mass schedules");

    for i in 0..24 {
        let (en, fr, rw, sw) = HOMILY_TITLES[i % HOMILY_TITLES.len()];
        let published = (today - Duration::days(rng.gen_range(0..365)))
            .format("%Y-%m-%d")
            .to_string();
        db.insert_homily(&NewHomily {
            published_at: published,
            title: LocalizedText {
                en: en.into(),
                fr: fr.into(),
                rw: rw.into(),
                sw: sw.into(),
            },
            content: LocalizedText::uniform(&paragraph(&mut rng, en)),
            image: Some(format!("homilies/homily_{}.jpg", i + 1)),
        })?;
    }
    info!("✓ Created 24 homilies");

    for title in PRAYER_TITLES {
        db.insert_healing_prayer(&NewHealingPrayer {
            title: LocalizedText::uniform(title),
            content: LocalizedText::uniform(&paragraph(&mut rng, title)),
            image: None,
        })?;
    }
    info!("✓ Created {} healing prayers", PRAYER_TITLES.len());

    for i in 0..30 {
        let (en, fr, rw, sw) = EVENT_TITLES[i % EVENT_TITLES.len()];
        let date = (today + Duration::days(rng.gen_range(1..365)))
            .format("%Y-%m-%d")
            .to_string();
        let hour = rng.gen_range(8..18);
        db.insert_event(&NewEvent {
            event_date: date,
            start_time: format!("{hour:02}:00"),
            end_time: format!("{:02}:00", hour + 1),
            title: LocalizedText {
                en: en.into(),
                fr: fr.into(),
                rw: rw.into(),
                sw: sw.into(),
            },
            description: LocalizedText::uniform(&paragraph(&mut rng, en)),
            image: Some(format!("events/event_{}.jpg", i + 1)),
        })?;
    }
    info!("✓ Created 30 events");

    for i in 0..12 {
        let published = (today - Duration::days(rng.gen_range(0..60)))
            .format("%Y-%m-%d")
            .to_string();
        let title = format!("Parish Notice {}", i + 1);
        db.insert_advertisement(&NewAdvertisement {
            published_at: published,
            title: LocalizedText::uniform(&title),
            content: LocalizedText::uniform(&paragraph(&mut rng, "parish life")),
            image: Some(format!("advertisements/{}.jpg", slugify(&title))),
        })?;
    }
    info!("✓ Created 12 advertisements");

    for name in ROOM_NAMES {
        let amenity_count = rng.gen_range(3..=5);
        let amenities: Vec<String> = AMENITIES
            .choose_multiple(&mut rng, amenity_count)
            .map(|a| a.to_string())
            .collect();
        let slug = slugify(name);
        let images = (1..=4)
            .map(|idx| NewRoomImage {
                image: format!("rooms/room_{slug}/image_{idx}.jpg"),
                alt_text: format!("{name} image {idx}"),
            })
            .collect();
        db.insert_room(&NewRoom {
            title: name.to_string(),
            location: CITIES.choose(&mut rng).unwrap().to_string(),
            description: paragraph(&mut rng, "a quiet stay near the parish"),
            price_per_night: rng.gen_range(50.0..300.0),
            amenities,
            images,
        })?;
    }
    info!("✓ Created {} rooms with images and amenities", ROOM_NAMES.len());

    for (i, author) in TESTIMONY_AUTHORS.iter().enumerate() {
        db.insert_testimony(&NewTestimony {
            author_name: author.to_string(),
            content: LocalizedText::uniform(&paragraph(&mut rng, "what this parish means to me")),
            // Leave a couple pending so the moderation queue is not empty.
            status: if i < 4 {
                TestimonyStatus::Published
            } else {
                TestimonyStatus::Pending
            },
        })?;
    }
    info!("✓ Created {} testimonies", TESTIMONY_AUTHORS.len());

    for i in 0..18 {
        db.insert_gallery_item(&NewGalleryItem {
            caption: LocalizedText::uniform(&format!("Parish life, photo {}", i + 1)),
            image: format!("gallery/photo_{}.jpg", i + 1),
        })?;
    }
    info!("✓ Created 18 gallery items");

    for (name, role) in MEMBER_NAMES.iter().zip(MEMBER_ROLES) {
        db.insert_member(&NewMember {
            name: name.to_string(),
            role: role.to_string(),
            image: Some(format!("members/{}.jpg", slugify(name))),
        })?;
    }
    info!("✓ Created {} members", MEMBER_NAMES.len());

    info!("✓ Seeding complete ({})", config.database_path);
    Ok(())
}
