#![allow(dead_code)]

use serde_json::{json, Value};

pub fn rick() -> Value {
    json!({
        "id": 1,
        "name": "Rick Sanchez",
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
        "episode": [
            "https://rickandmortyapi.com/api/episode/1",
            "https://rickandmortyapi.com/api/episode/2"
        ],
        "url": "https://rickandmortyapi.com/api/character/1",
        "created": "2017-11-04T18:48:46.250Z"
    })
}

pub fn morty() -> Value {
    json!({
        "id": 2,
        "name": "Morty Smith",
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "unknown", "url": ""},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg",
        "episode": ["https://rickandmortyapi.com/api/episode/1"],
        "url": "https://rickandmortyapi.com/api/character/2",
        "created": "2017-11-04T18:50:21.651Z"
    })
}

pub fn characters_page() -> Value {
    json!({
        "info": {
            "count": 29,
            "pages": 2,
            "next": "https://rickandmortyapi.com/api/character?page=2&name=rick",
            "prev": null
        },
        "results": [rick(), morty()]
    })
}
