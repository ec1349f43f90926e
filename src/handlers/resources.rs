use axum::Json;

use crate::dto::{EmergencyContact, EmergencyResourcesResponse, Hotline, OnlineResource};

pub async fn emergency_resources() -> Json<EmergencyResourcesResponse> {
    Json(EmergencyResourcesResponse {
        crisis_hotlines: vec![
            Hotline {
                name: "Crisis Text Line",
                contact: "Text HOME to 741741",
                description: "24/7 crisis support via text message",
                website: "https://www.crisistextline.org/",
            },
            Hotline {
                name: "National Suicide Prevention Lifeline",
                contact: "Call or text 988",
                description: "24/7 free and confidential support",
                website: "https://suicidepreventionlifeline.org/",
            },
            Hotline {
                name: "SAMHSA National Helpline",
                contact: "1-800-662-HELP (4357)",
                description: "Treatment referral and information service",
                website: "https://www.samhsa.gov/find-help/national-helpline",
            },
        ],
        online_resources: vec![
            OnlineResource {
                name: "7 Cups",
                description: "Free online emotional support",
                website: "https://www.7cups.com/",
            },
            OnlineResource {
                name: "MindShift",
                description: "Anxiety management app",
                website: "https://www.anxietycanada.com/resources/mindshift-app/",
            },
            OnlineResource {
                name: "Headspace",
                description: "Meditation and mindfulness",
                website: "https://www.headspace.com/",
            },
        ],
        emergency: EmergencyContact {
            name: "Emergency Services",
            contact: "911",
            description: "For immediate life-threatening emergencies",
        },
    })
}
