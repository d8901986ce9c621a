//! The four built-in NCC 2022 topics, in match-priority order.

use super::{KnowledgeTopic, Source, Topic};

pub(super) static TOPICS: [KnowledgeTopic; 4] = [
    KnowledgeTopic {
        topic: Topic::FireSafety,
        section_label: "Section C",
        content: "Fire safety requirements in the Building Code of Australia are primarily covered in Section C of the NCC. Buildings must comply with fire resistance levels (FRL) appropriate for their classification and use. Class 2 buildings (apartments) require specific fire separation between units and common areas.",
        keywords: &["fire", "safety", "flame", "smoke"],
        sources: &[
            Source {
                section: "Section C1.1",
                title: "Fire Resistance",
                excerpt: "An element is to have an FRL appropriate for its intended purpose, which shall be verified by testing, or calculation based on testing, in accordance with C1.2, C1.3 and C1.5.",
            },
            Source {
                section: "Section C2.2",
                title: "Fire Separation",
                excerpt: "Fire separation must be provided between different fire compartments to prevent the spread of fire.",
            },
        ],
    },
    KnowledgeTopic {
        topic: Topic::EnergyEfficiency,
        section_label: "Section J",
        content: "Energy efficiency requirements are detailed in Section J of the NCC. The 2022 edition introduced stricter thermal performance standards, requiring buildings to achieve higher star ratings. New homes must now meet 7-star energy efficiency, up from the previous 6-star requirement.",
        keywords: &["energy", "efficiency", "thermal", "star", "rating"],
        sources: &[
            Source {
                section: "Section J1.2",
                title: "Energy Efficiency",
                excerpt: "Buildings must achieve the energy efficiency requirements specified in this section.",
            },
            Source {
                section: "Section J1.5",
                title: "Building Fabric",
                excerpt: "The building fabric must comply with thermal performance requirements to achieve the required energy efficiency.",
            },
        ],
    },
    KnowledgeTopic {
        topic: Topic::Structural,
        section_label: "Section B",
        content: "Structural requirements are covered in Section B of the NCC. All structural elements must be designed to withstand the loads and forces they may reasonably be expected to experience during construction and use. This includes dead loads, live loads, wind loads, and seismic forces where applicable.",
        keywords: &["structural", "structure", "load", "force", "beam", "column"],
        sources: &[
            Source {
                section: "Section B1.2",
                title: "Structural Provisions",
                excerpt: "A building or structure must have structural integrity during construction and use.",
            },
            Source {
                section: "Section B1.4",
                title: "Loads and Forces",
                excerpt: "Structural elements must be designed for appropriate loads and forces as specified in the relevant Australian Standards.",
            },
        ],
    },
    KnowledgeTopic {
        topic: Topic::Accessibility,
        section_label: "Section D",
        content: "Accessibility requirements are outlined in Section D of the NCC. Buildings must provide appropriate access and facilities for people with disabilities, including accessible paths of travel, doorways, ramps, and sanitary facilities.",
        keywords: &["access", "accessibility", "disability", "disabled"],
        sources: &[Source {
            section: "Section D3.1",
            title: "Access for People with Disabilities",
            excerpt: "Buildings must provide access and facilities for people with disabilities in accordance with the Disability Discrimination Act.",
        }],
    },
];
