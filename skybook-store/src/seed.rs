use skybook_catalog::{DomesticFare, FlightFare, InternationalFare};
use skybook_core::repository::{FlightRepository, UserRepository};
use skybook_core::user::{AdminProfile, User};
use skybook_core::{CoreResult, Flight};
use tracing::info;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub flights: usize,
    pub users: usize,
}

#[allow(clippy::too_many_arguments)]
fn flight(
    number: &str,
    airline: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
    duration: &str,
    base_price: f64,
    seats: u32,
    image: &str,
    fare: FlightFare,
) -> Flight {
    Flight {
        id: 0,
        flight_number: number.to_string(),
        airline: airline.to_string(),
        departure_city: from.to_string(),
        arrival_city: to.to_string(),
        departure_time: departure.to_string(),
        arrival_time: arrival.to_string(),
        duration: duration.to_string(),
        base_price,
        available_seats: seats,
        image: image.to_string(),
        fare,
    }
}

fn domestic(meal: bool) -> FlightFare {
    FlightFare::Domestic(DomesticFare {
        includes_meal: meal,
        ..DomesticFare::default()
    })
}

fn international(country: &str, visa_required: bool, baggage_kg: u32) -> FlightFare {
    FlightFare::International(InternationalFare {
        visa_required,
        baggage_allowance_kg: baggage_kg,
        destination_country: country.to_string(),
        ..InternationalFare::default()
    })
}

pub fn sample_flights() -> Vec<Flight> {
    vec![
        flight(
            "AI101", "Air India", "Delhi (DEL)", "Mumbai (BOM)", "6:00 AM", "8:15 AM", "2h 15m",
            4500.0, 50,
            "https://images.unsplash.com/photo-1436491865332-7a61a109cc05?w=400",
            domestic(true),
        ),
        flight(
            "6E202", "IndiGo", "Mumbai (BOM)", "Bangalore (BLR)", "9:30 AM", "11:00 AM", "1h 30m",
            3800.0, 45,
            "https://images.unsplash.com/photo-1464037866556-6812c9d1c72e?w=400",
            domestic(false),
        ),
        flight(
            "SG303", "SpiceJet", "Delhi (DEL)", "Goa (GOI)", "10:45 AM", "1:15 PM", "2h 30m",
            5200.0, 40,
            "https://images.unsplash.com/photo-1520109344942-de335cbddc98?w=400",
            domestic(true),
        ),
        flight(
            "UK404", "Vistara", "Bangalore (BLR)", "Hyderabad (HYD)", "2:30 PM", "3:30 PM", "1h 00m",
            2900.0, 55,
            "https://images.unsplash.com/photo-1583427920852-e069a2b84e8a?w=400",
            domestic(false),
        ),
        flight(
            "AI505", "Air India", "Delhi (DEL)", "Dubai (DXB)", "11:00 PM", "1:30 AM", "3h 30m",
            18000.0, 30,
            "https://images.unsplash.com/photo-1542296332-2e4473faf563?w=400",
            international("UAE", true, 30),
        ),
        flight(
            "EK606", "Emirates", "Mumbai (BOM)", "Singapore (SIN)", "2:00 AM", "9:30 AM", "5h 30m",
            25000.0, 25,
            "https://images.unsplash.com/photo-1569629743817-70d8db6c323b?w=400",
            international("Singapore", false, 35),
        ),
    ]
}

pub fn sample_users() -> Vec<User> {
    let mut passenger = User::new_passenger("passenger@test.com", "password123", "John", "Doe");
    passenger.phone = Some("9876543210".to_string());
    passenger.location = Some("Delhi".to_string());
    passenger.add_loyalty_points(500);

    let mut admin = User::new_admin(
        "admin@skybook.com",
        "admin123",
        "Admin User",
        AdminProfile {
            department: Some("Operations".to_string()),
            admin_level: 2,
            can_manage_flights: true,
            can_manage_users: true,
        },
    );
    admin.phone = Some("9999999999".to_string());

    vec![passenger, admin]
}

/// Fill empty collections with sample data. Collections that already hold
/// anything are left alone.
pub async fn seed_sample_data(
    flights: &dyn FlightRepository,
    users: &dyn UserRepository,
) -> CoreResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    if flights.list().await?.is_empty() {
        for flight in sample_flights() {
            flights.create(flight).await?;
            summary.flights += 1;
        }
        info!("Seeded {} sample flights", summary.flights);
    }

    if users.list().await?.is_empty() {
        for user in sample_users() {
            users.create(user).await?;
            summary.users += 1;
        }
        info!("Seeded {} sample users", summary.users);
    }

    Ok(summary)
}
